use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Kind of mutation a [`TableChange`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
	Insert,
	Update,
	Delete,
}

/// A single datastore mutation, broadcast to connected admin dashboards.
///
/// Dashboards use the table name to decide whether to patch their local
/// state in place (messages) or refetch the affected collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableChange {
	pub table: String,
	pub kind: ChangeKind,
	/// Row id for insert/delete events; singleton id for upserts
	pub id: String,
	/// The inserted row, when the event carries enough for a dashboard
	/// to patch its list without refetching (message inserts do)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub row: Option<serde_json::Value>,
}

impl TableChange {
	pub fn new(table: &str, kind: ChangeKind, id: &str) -> Self {
		Self {
			table: table.to_string(),
			kind,
			id: id.to_string(),
			row: None,
		}
	}

	/// Attach the full row to the event
	pub fn with_row(mut self, row: serde_json::Value) -> Self {
		self.row = Some(row);
		self
	}

	/// Encode as a server-sent event frame
	///
	/// # Examples
	///
	/// ```
	/// use folio::feed::{ChangeKind, TableChange};
	///
	/// let change = TableChange::new("skills", ChangeKind::Insert, "abc");
	/// let frame = change.sse_event();
	/// assert!(frame.starts_with("data: "));
	/// assert!(frame.ends_with("\n\n"));
	/// ```
	pub fn sse_event(&self) -> String {
		// Serialization of this shape cannot fail; fall back to an
		// empty object rather than poisoning the stream.
		let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
		format!("data: {}\n\n", json)
	}
}

/// Broadcast channel fanning datastore changes out to SSE subscribers.
///
/// Slow subscribers that lag behind the channel capacity miss events;
/// the dashboard recovers by refetching on the next event it does see.
#[derive(Clone)]
pub struct ChangeFeed {
	sender: broadcast::Sender<TableChange>,
}

impl ChangeFeed {
	pub fn new() -> Self {
		let (sender, _) = broadcast::channel(64);
		Self { sender }
	}

	/// Publish a change; returns silently when nobody is listening
	pub fn publish(&self, change: TableChange) {
		let _ = self.sender.send(change);
	}

	/// Subscribe to future changes
	pub fn subscribe(&self) -> broadcast::Receiver<TableChange> {
		self.sender.subscribe()
	}

	/// Number of live subscribers
	pub fn subscriber_count(&self) -> usize {
		self.sender.receiver_count()
	}
}

impl Default for ChangeFeed {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn subscribers_receive_published_changes() {
		let feed = ChangeFeed::new();
		let mut rx = feed.subscribe();

		feed.publish(TableChange::new("messages", ChangeKind::Insert, "m1"));
		let change = rx.recv().await.unwrap();
		assert_eq!(change.table, "messages");
		assert_eq!(change.kind, ChangeKind::Insert);
		assert_eq!(change.id, "m1");
	}

	#[test]
	fn publish_without_subscribers_does_not_panic() {
		let feed = ChangeFeed::new();
		feed.publish(TableChange::new("skills", ChangeKind::Delete, "s1"));
		assert_eq!(feed.subscriber_count(), 0);
	}

	#[test]
	fn sse_frame_is_valid_json_payload() {
		let change = TableChange::new("hero", ChangeKind::Update, "10000000-0000-0000-0000-000000000000");
		let frame = change.sse_event();
		let json = frame.strip_prefix("data: ").unwrap().trim_end();
		let decoded: TableChange = serde_json::from_str(json).unwrap();
		assert_eq!(decoded, change);
	}

	#[test]
	fn row_is_omitted_from_the_frame_unless_attached() {
		let bare = TableChange::new("skills", ChangeKind::Insert, "s1");
		assert!(!bare.sse_event().contains("\"row\""));

		let with_row = TableChange::new("messages", ChangeKind::Insert, "m1")
			.with_row(serde_json::json!({"id": "m1", "name": "Visitor"}));
		let frame = with_row.sse_event();
		let json = frame.strip_prefix("data: ").unwrap().trim_end();
		let decoded: TableChange = serde_json::from_str(json).unwrap();
		assert_eq!(decoded.row.unwrap()["name"], "Visitor");
	}
}
