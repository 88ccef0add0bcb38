//! Parsing a webhook payload.
//!
//! Reads a JSON payload as CloudMailin would post it and prints the most
//! useful parts of the message.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example parse_webhook -- ./tests/fixtures/post.json
//! ```

use cloudmailin_client::parse_incoming;
use std::fs::File;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: parse_webhook <payload.json>")?;

    let mail = parse_incoming(File::open(&path)?)?;

    println!("From:       {}", mail.headers.from());
    println!("To:         {}", mail.headers.to());
    println!("Subject:    {}", mail.headers.subject());
    println!("Message-ID: {}", mail.headers.message_id());
    println!("SPF:        {} ({})", mail.envelope.spf.result, mail.envelope.spf.domain);

    if let Some(received) = mail.headers.find("received") {
        println!("Hops:       {}", received.len());
        println!("Origin:     {}", received.first());
    }

    println!("\n{}", mail.reply_plain);

    for attachment in &mail.attachments {
        println!(
            "Attachment: {} ({}, {} bytes)",
            attachment.file_name, attachment.content_type, attachment.size
        );
    }

    Ok(())
}
