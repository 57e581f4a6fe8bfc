use std::sync::Arc;

use saklolo_types::{Post, SortMode};
use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ApiResult, PostService};
use crate::report::DraftReport;

/// Completed remote calls, delivered back to the event loop
#[derive(Debug)]
pub enum AppMessage {
    PostsLoaded {
        token: u64,
        sort: SortMode,
        result: ApiResult<Vec<Post>>,
    },
    ReportSubmitted {
        session: u64,
        result: ApiResult<Post>,
    },
}

pub fn fetch_feed(
    service: Arc<dyn PostService>,
    tx: UnboundedSender<AppMessage>,
    token: u64,
    sort: SortMode,
) {
    tokio::spawn(async move {
        let result = service.fetch_feed(sort).await;
        if tx.send(AppMessage::PostsLoaded { token, sort, result }).is_err() {
            log::error!("failed to send PostsLoaded message");
        }
    });
}

pub fn create_post(
    service: Arc<dyn PostService>,
    tx: UnboundedSender<AppMessage>,
    session: u64,
    draft: DraftReport,
) {
    tokio::spawn(async move {
        let result = service.create_post(draft).await;
        if tx.send(AppMessage::ReportSubmitted { session, result }).is_err() {
            log::error!("failed to send ReportSubmitted message");
        }
    });
}
