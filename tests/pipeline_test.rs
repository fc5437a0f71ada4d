//! End-to-end properties of the stream pipeline.
//!
//! These complement the unit tests in src/session.rs by pushing realistic
//! backend streams through a session at many chunk sizes.

mod common;

use common::{chunked, run_chunks, StreamBody};
use serde_json::json;
use shopbot::decode::PayloadDecoder;
use shopbot::models::{DecodedMessage, Product, Sender};
use shopbot::render::MessageRenderer;
use shopbot::sse::{EventExtractor, EventFrame, ExtractedLine};
use shopbot::traits::HttpError;
use shopbot::{Completion, StreamSession, Transcript};

fn product_answer() -> String {
    StreamBody::new()
        .noise(": ping")
        .frame(json!({
            "response": "Here are **two** picks for your mare \u{1f434}:\n1. Fly mask\n2. Fly sheet",
            "products": [
                {"title": "Crusader Fly Mask", "image": "https://shop.test/m.jpg",
                 "link": "https://shop.test/p/mask", "price": "$24.00",
                 "description": "Fine mesh, café edition"},
                {"title": "Sheet <XL>", "price": 89.5, "stock_status": "instock"}
            ],
            "includes_products": true
        }))
        .noise("")
        .frame(json!({"response": "Anything else?"}))
        .build()
}

#[test]
fn test_every_chunk_size_gives_same_transcript() {
    let body = product_answer();
    let whole = run_chunks(&[body.as_bytes()]);
    assert_eq!(whole.len(), 4);

    for size in 1..=17 {
        let chunks = chunked(body.as_bytes(), size);
        assert_eq!(run_chunks(&chunks), whole, "chunk size {}", size);
    }
}

#[test]
fn test_multibyte_characters_survive_any_split() {
    let body = product_answer();
    let transcript = run_chunks(&chunked(body.as_bytes(), 1));
    let html = transcript.html();
    assert!(html.contains('\u{1f434}'));
    assert!(html.contains("café edition"));
    assert!(!html.contains('\u{fffd}'));
}

#[test]
fn test_sentinel_never_becomes_a_message() {
    let without = product_answer();
    let with = format!("{}event: DONE\ndata: [DONE]\n", without);

    let mut transcript = Transcript::new();
    let mut session = StreamSession::new(EventExtractor::default(), &mut transcript);
    for chunk in chunked(with.as_bytes(), 5) {
        session.feed(&chunk);
    }
    assert_eq!(session.completion(), Some(Completion::Sentinel));
    drop(session);

    assert_eq!(transcript, run_chunks(&[without.as_bytes()]));
    assert!(!transcript.html().contains("[DONE]"));
}

#[test]
fn test_crlf_streams_match_lf_streams() {
    let lf = product_answer();
    let crlf = lf.replace('\n', "\r\n");
    for size in [1, 2, 3, 64] {
        assert_eq!(
            run_chunks(&chunked(crlf.as_bytes(), size)),
            run_chunks(&[lf.as_bytes()]),
            "chunk size {}",
            size
        );
    }
}

#[test]
fn test_line_detection_ignores_non_frames() {
    let extractor = EventExtractor::default();
    for line in ["", ": comment", "event: DONE", "data:no-space", " data: indented", "id: 7"] {
        assert_eq!(extractor.extract(line), ExtractedLine::Ignored, "{:?}", line);
        assert_eq!(extractor.extract(line), extractor.extract(line));
    }
    assert_eq!(extractor.extract("data: [DONE]"), ExtractedLine::Sentinel);
    assert_eq!(
        extractor.extract("data:  spaced  "),
        ExtractedLine::Frame(EventFrame::new("spaced"))
    );
}

#[test]
fn test_decoder_is_total_on_garbage() {
    let decoder = PayloadDecoder::new();
    let inputs = [
        "",
        "{",
        "}{",
        "null",
        "[1, 2",
        "\"unterminated",
        "{\"response\": }",
        "{\"products\": \"nope\"}",
        "{\"products\": [1, null, \"x\", {\"title\": {}}]}",
        "```json\n{\"response\": ```",
        "\u{0}\u{1}\u{fffd}",
    ];
    for input in inputs {
        let message = decoder.decode(&EventFrame::new(input));
        let _ = MessageRenderer::new().render(&message, message.sender());
    }
}

#[test]
fn test_double_encoded_fenced_payload() {
    let inner = json!({
        "response": "Inner text",
        "products": [{"title": "Inner product"}]
    });
    let payload = json!({
        "response": format!("```json\n{}\n```", inner),
        "products": [{"title": "Outer product"}]
    });

    let transcript = run_chunks(&[StreamBody::new().frame(payload).build()]);

    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.entries()[0].segment.html(), "<p>Inner text</p>");
    assert!(transcript.entries()[1].segment.html().contains("Inner product"));
    assert!(!transcript.html().contains("Outer product"));
}

#[test]
fn test_escaping_depends_on_sender() {
    let renderer = MessageRenderer::new();
    let message = DecodedMessage::text("<i>x</i> & **y**");

    let user = renderer.render(&message, Sender::User);
    let error = renderer.render(&message, Sender::Error);
    let assistant = renderer.render(&message, Sender::Assistant);

    assert_eq!(
        user[0].html(),
        "<p>&lt;i&gt;x&lt;/i&gt; &amp; <strong>y</strong></p>"
    );
    assert_eq!(error, user);
    assert_eq!(assistant[0].html(), "<p><i>x</i> & <strong>y</strong></p>");
}

#[test]
fn test_product_cards_escape_text_but_not_urls() {
    let product = Product::new(
        "<b>Mask</b>",
        "https://shop.test/i.jpg?a=1&b=2",
        "https://shop.test/p?x=1&y=2",
        "$1 < $2",
        "it's \"great\"",
    );
    let segments = MessageRenderer::new().render(
        &DecodedMessage::with_products("", vec![product]),
        Sender::Assistant,
    );

    assert_eq!(segments.len(), 1);
    let html = segments[0].html();
    assert!(html.contains("&lt;b&gt;Mask&lt;/b&gt;"));
    assert!(html.contains("$1 &lt; $2"));
    assert!(html.contains("it&#039;s &quot;great&quot;"));
    assert!(html.contains(r#"src="https://shop.test/i.jpg?a=1&b=2""#));
    assert!(html.contains(r#"href="https://shop.test/p?x=1&y=2""#));
}

#[test]
fn test_failure_after_partial_answer() {
    let body = product_answer();
    let (head, _) = body.as_bytes().split_at(body.len() / 2);

    let mut transcript = Transcript::new();
    let mut session = StreamSession::new(EventExtractor::default(), &mut transcript);
    session.feed(head);
    session.fail(&HttpError::Timeout("operation timed out".to_string()));
    session.feed(b"data: late\n");
    drop(session);

    let errors: Vec<_> = transcript.from_sender(Sender::Error).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].segment.html(),
        "<p>Error: Request timeout: operation timed out</p>"
    );
    assert_eq!(transcript.entries().last().map(|e| e.sender), Some(Sender::Error));
}

#[test]
fn test_odd_product_fields_still_render_the_card() {
    let body = StreamBody::new()
        .frame(json!({
            "response": "Try these",
            "products": [
                {"title": "Fly Mask", "price": "$24", "image": {"src": "https://shop.test/m.jpg"}},
                {"title": "Fly Sheet", "price": "$89", "stock_status": "instock", "stockStatus": "instock"}
            ]
        }))
        .build();

    let transcript = run_chunks(&[body]);

    assert_eq!(transcript.len(), 3);
    let mask = transcript.entries()[1].segment.html();
    assert!(mask.contains("Fly Mask"));
    assert!(!mask.contains("<img"));
    let sheet = transcript.entries()[2].segment.html();
    assert!(sheet.contains(r#"<p class="product-stock">instock</p>"#));
}
