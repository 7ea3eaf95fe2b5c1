//! Worked SSE framing scenarios against the public [`jtoken::sse`] surface.

use jtoken::sse::{SseCursor, SseEvent};

#[test]
fn keepalive_comment_then_truncated_line_reports_need_more() {
    let buf = b": keepalive\nda";
    let mut cur = SseCursor::new();
    assert_eq!(cur.next_event(buf), SseEvent::NeedMore);
    assert_eq!(cur.pos(), 12);
}

#[test]
fn crlf_terminated_data_line_strips_cr() {
    let buf = b"data: hi\r\n";
    let mut cur = SseCursor::new();
    assert_eq!(cur.next_event(buf), SseEvent::Data(b"hi"));
}

#[test]
fn event_field_is_skipped_silently_before_data() {
    let buf = b"event: x\ndata: ok\n";
    let mut cur = SseCursor::new();
    assert_eq!(cur.next_event(buf), SseEvent::Data(b"ok"));
}

#[test]
fn growing_buffer_resumes_from_the_same_incomplete_line() {
    let mut cur = SseCursor::new();
    let mut buf = std::vec::Vec::from(&b"id: 1\ndata: partial-pay"[..]);
    assert_eq!(cur.next_event(&buf), SseEvent::NeedMore);
    let resume_at = cur.pos();

    buf.extend_from_slice(b"load\n");
    assert_eq!(cur.next_event(&buf), SseEvent::Data(b"partial-payload"));
    assert!(cur.pos() > resume_at);
}

#[test]
fn a_full_stream_yields_each_data_payload_in_order() {
    let buf = b": hello\nevent: tick\ndata: one\nid: 7\nretry: 3000\n\ndata: two\n";
    let mut cur = SseCursor::new();
    let mut payloads = std::vec::Vec::new();
    loop {
        match cur.next_event(buf) {
            SseEvent::Data(p) => payloads.push(p.to_vec()),
            SseEvent::NeedMore => break,
        }
    }
    assert_eq!(payloads, vec![b"one".to_vec(), b"two".to_vec()]);
}
