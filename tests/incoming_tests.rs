//! Tests for parsing inbound webhook payloads.

use cloudmailin_client::{
    parse_incoming, parse_incoming_bytes, CloudMailinError, IncomingMail, IncomingMailAttachment,
    IncomingMailAttachmentScan, IncomingMailEnvelope, IncomingMailEnvelopeSpf, IncomingMailHeader,
    IncomingMailHeaders,
};
use pretty_assertions::assert_eq;
use std::fs::File;
use test_case::test_case;

const POST_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/post.json");
const PIXEL_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP0rdr1HwAFHwKCk87e6gAAAABJRU5ErkJggg==";

fn fixture_mail() -> IncomingMail {
    let file = File::open(POST_FIXTURE).unwrap();
    parse_incoming(file).unwrap()
}

fn sample_headers() -> IncomingMailHeaders {
    [
        ("to", IncomingMailHeader::from("Example User <user@example.com>")),
        ("received", IncomingMailHeader::from(["Received 2", "Received 1"])),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_parse_reader_envelope() {
    let mail = fixture_mail();

    assert_eq!(
        mail.envelope,
        IncomingMailEnvelope {
            to: "postman@cloudmailin.net".to_string(),
            from: "from+test@cloudmailin.net".to_string(),
            recipients: vec!["postman@cloudmailin.net".to_string()],
            helo_domain: "cloudmailin.net".to_string(),
            remote_ip: "172.20.0.18".to_string(),
            tls: true,
            tls_cipher: "TLSv1.3".to_string(),
            md5: String::new(),
            store_url: "http://example.s3.amazonaws.com/store/2020_10_22_09_55_18_ce5f9a939358ba89b80acd97f737e0db.eml".to_string(),
            spf: IncomingMailEnvelopeSpf {
                result: "fail".to_string(),
                domain: "cloudmailin.net".to_string(),
            },
            spamd: None,
        }
    );
}

#[test]
fn test_parse_reader_bodies() {
    let mail = fixture_mail();

    assert_eq!(
        mail.plain,
        "Test Content\n\n> On 08 Jul 2020 at 10:00, example@cloudmailin.net wrote:\n> \n> Example message\n> Option: 2\n> \n\n"
    );
    assert_eq!(mail.html, "<div dir=\"ltr\">Test Content<div><br></div></div>\n");
    assert_eq!(mail.reply_plain, "Test Content\n");
}

#[test]
fn test_parse_reader_attachments() {
    let mail = fixture_mail();

    assert_eq!(
        mail.attachments,
        vec![IncomingMailAttachment {
            content: PIXEL_BASE64.to_string(),
            file_name: "pixel.png".to_string(),
            content_type: "image/png".to_string(),
            size: 37135,
            disposition: "attachment".to_string(),
            content_id: "<f_kcd6ejvs1>".to_string(),
            url: String::new(),
            scan: IncomingMailAttachmentScan {
                status: "ok".to_string(),
                id: "b1a187b7-bd22-406a-8c1a-f532a0ce5ba6".to_string(),
                matches: vec!["Example Match".to_string()],
            },
        }]
    );
}

#[test]
fn test_parse_bytes_matches_reader() {
    let data = std::fs::read(POST_FIXTURE).unwrap();
    let mail = parse_incoming_bytes(&data).unwrap();

    assert_eq!(mail, fixture_mail());
}

#[test]
fn test_parse_invalid_json() {
    assert!(matches!(
        parse_incoming("{ invalid".as_bytes()),
        Err(CloudMailinError::Decode { .. })
    ));
    assert!(parse_incoming_bytes(b"{").is_err());
}

#[test]
fn test_parse_null_optional_fields() {
    let mut value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(POST_FIXTURE).unwrap()).unwrap();
    value["envelope"]["store_url"] = serde_json::Value::Null;
    value["attachments"][0]["content_id"] = serde_json::Value::Null;
    value["attachments"][0]["url"] = serde_json::Value::Null;

    let mail = parse_incoming_bytes(value.to_string().as_bytes()).unwrap();

    assert_eq!(mail.envelope.store_url, "");
    assert_eq!(mail.attachments[0].content_id, "");
    assert_eq!(mail.attachments[0].url, "");
    assert_eq!(mail.attachments[0].file_name, "pixel.png");
}

#[test]
fn test_header_helpers_from_fixture() {
    let mail = fixture_mail();

    assert_eq!(mail.headers.to(), "postman@cloudmailin.net");
    assert_eq!(mail.headers.from(), "Steve Smith <test@example.com>");
    assert_eq!(mail.headers.subject(), "Test Email");
    assert_eq!(
        mail.headers.message_id(),
        "<CALazKR8Zr8Lsv+SUAeuaL-vrhWSCK36TRU8=7HjsenxwaP9ZbA@mail.gmail.com>"
    );
}

#[test]
fn test_received_ordering_from_fixture() {
    let mail = fixture_mail();
    let received = mail.headers.find("received").unwrap();

    assert_eq!(received.len(), 2);
    assert!(mail.headers.last("received").contains("mx1.cloudmailin.net"));
    assert!(mail.headers.first("received").contains("mail-wr1-f43.google.com with SMTP"));
}

#[test_case("to", "Example User <user@example.com>" ; "single value")]
#[test_case("received", "Received 1" ; "bottom-most received")]
#[test_case("foo", "" ; "missing header")]
fn test_headers_first(name: &str, expected: &str) {
    assert_eq!(sample_headers().first(name), expected);
}

#[test_case("to", "Example User <user@example.com>" ; "single value")]
#[test_case("received", "Received 2" ; "top-most received")]
#[test_case("foo", "" ; "missing header")]
fn test_headers_last(name: &str, expected: &str) {
    assert_eq!(sample_headers().last(name), expected);
}

#[test_case(r#""x""#, Some(vec!["x"]) ; "bare string")]
#[test_case(r#"["a","b"]"#, Some(vec!["a", "b"]) ; "array of strings")]
#[test_case("[]", Some(vec![]) ; "empty array")]
#[test_case("null", None ; "null")]
#[test_case("[null]", None ; "array with null")]
#[test_case("42", None ; "number")]
#[test_case("{}", None ; "object")]
#[test_case(r#"["a",true]"#, None ; "mixed array")]
fn test_header_wire_decoding(raw: &str, expected: Option<Vec<&str>>) {
    let decoded = serde_json::from_str::<IncomingMailHeader>(raw).ok();
    let decoded = decoded.map(|h| h.into_values());
    let expected = expected.map(|v| v.into_iter().map(String::from).collect::<Vec<_>>());

    assert_eq!(decoded, expected);
}

#[test]
fn test_reencode_round_trip() {
    let mail = fixture_mail();
    let encoded = serde_json::to_vec(&mail).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();

    assert_eq!(value["attachments"][0]["size"], "37135");
    assert_eq!(parse_incoming_bytes(&encoded).unwrap(), mail);
}
