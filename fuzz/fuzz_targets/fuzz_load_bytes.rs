#![no_main]

use std::convert::Infallible;

use bytes::Bytes;
use futures_util::stream;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use libfuzzer_sys::fuzz_target;
use multer_mixed::{Load, LoadEvent, LoadOptions, TransportEvent};
use tokio::runtime;

fuzz_target!(|data: &[u8]| {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("multipart/mixed; boundary=X-BOUNDARY"));

    let mut events = vec![Result::<_, Infallible>::Ok(TransportEvent::Headers {
        status: StatusCode::OK,
        headers,
    })];
    events.extend(
        data.chunks(7)
            .map(|chunk| Ok(TransportEvent::Body(Bytes::copy_from_slice(chunk)))),
    );
    events.push(Ok(TransportEvent::Complete));

    let mut load = Load::from_events(stream::iter(events), LoadOptions::new());

    let rt = runtime::Builder::new_current_thread().build().expect("runtime");
    rt.block_on(async {
        let mut delivered = 0;
        while let Some(event) = load.next_event().await.expect("no transport errors") {
            if let LoadEvent::Progress(progress) = event {
                assert_eq!(progress.delivered, delivered);
                delivered += progress.entries.len();
            }
        }
    })
});
