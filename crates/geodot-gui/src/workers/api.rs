use std::sync::mpsc;
use std::time::Instant;

use geodot_core::api::{execute, ApiRequest, HttpBackend};

use crate::messages::WorkerResult;

use super::send;

pub(super) fn handle_request(
    backend: &HttpBackend,
    request: ApiRequest,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = execute(backend, request.clone());
    tracing::debug!(
        request = request.describe(),
        ok = result.is_ok(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request finished"
    );
    send(tx, ctx, WorkerResult::Api { request, result });
}
