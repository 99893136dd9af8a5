//! Test data generator for chatgram.
//!
//! Writes a synthetic Telegram full export with `chats.list`, mixing plain
//! and composite text with the records the importer discards (service
//! events, media-only posts, deleted senders).
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [chats] [messages-per-chat] [output]
//! Example: cargo run --features gen-test --bin gen_test -- 20 50000 heavy_export.json

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤔", "🙄", "😱", "🤯", "💀", "🤖", "🦄", "🌈", "⚡", "🔥", "👍", "❤️",
    "🏳️‍🌈", "👨‍👩‍👧‍👦", "🤷‍♀️",
];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "User;With;Semicolons",
    "User\"With\"Quotes",
    "🔥FireUser🔥",
];

const SERVICE_ACTIONS: &[&str] = &[
    "create_group",
    "invite_members",
    "remove_members",
    "pin_message",
    "edit_group_title",
    "phone_call",
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let chats: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
    let per_chat: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let output = args.get(3).map_or("test_export.json", String::as_str);

    println!("🧪 Export Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Chats:    {}", chats);
    println!("   Messages: {} per chat", per_chat);
    println!("   Output:   {}", output);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();
    let start = Instant::now();
    let mut records = 0usize;

    writeln!(writer, "{{")?;
    writeln!(writer, "  \"about\": \"Generated by chatgram gen_test\",")?;
    writeln!(writer, "  \"chats\": {{")?;
    writeln!(writer, "    \"about\": \"This page lists all chats from this export.\",")?;
    writeln!(writer, "    \"list\": [")?;

    for chat in 0..chats {
        let name = format!("Chat #{} {}", chat + 1, EMOJIS[chat % EMOJIS.len()]);
        writeln!(writer, "      {{")?;
        writeln!(writer, "        \"name\": {},", Value::from(name))?;
        writeln!(writer, "        \"type\": \"private_group\",")?;
        writeln!(writer, "        \"id\": {},", chat + 1)?;
        writeln!(writer, "        \"messages\": [")?;

        let mut clock = first_timestamp(&mut rng);
        for i in 0..per_chat {
            clock += Duration::minutes(rng.gen_range(1..=600));
            let record = generate_record(&mut rng, i, clock);
            let comma = if i + 1 < per_chat { "," } else { "" };
            writeln!(writer, "          {record}{comma}")?;

            records += 1;
            if records % 10_000 == 0 {
                eprint!(
                    "\r   Generated {}/{} records",
                    records,
                    chats * per_chat
                );
            }
        }

        let comma = if chat + 1 < chats { "," } else { "" };
        writeln!(writer, "        ]")?;
        writeln!(writer, "      }}{comma}")?;
    }

    writeln!(writer, "    ]")?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    writer.flush()?;

    let elapsed = start.elapsed();
    let size = std::fs::metadata(output)?.len();

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", size as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} records/s",
        records as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn first_timestamp(rng: &mut impl Rng) -> NaiveDateTime {
    let base = NaiveDate::from_ymd_opt(2016, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    base + Duration::days(rng.gen_range(0..2000))
}

/// One record of a chat's `messages` array.
///
/// Roughly 80% are kept by the importer; the rest are discards.
fn generate_record(rng: &mut impl Rng, index: usize, at: NaiveDateTime) -> Value {
    let date = at.format("%Y-%m-%dT%H:%M:%S").to_string();
    let sender = SENDERS.choose(rng).copied().unwrap_or("Alice");
    let id = index + 1;

    match rng.gen_range(0..100) {
        0..=64 => json!({
            "id": id, "type": "message", "date": date,
            "from": sender, "from_id": "user1", "text": generate_text(rng, index),
        }),
        65..=79 => json!({
            "id": id, "type": "message", "date": date, "from": sender,
            "text": [
                "See ",
                {"type": "link", "text": format!("https://example.com/{index}")},
                " and ",
                {"type": "bold", "text": "this"},
            ],
        }),
        80..=87 => json!({
            "id": id, "type": "service", "date": date, "actor": sender,
            "action": SERVICE_ACTIONS.choose(rng).copied().unwrap_or("pin_message"),
            "text": "",
        }),
        88..=94 => json!({
            "id": id, "type": "message", "date": date, "from": sender,
            "photo": format!("photos/photo_{index}.jpg"), "text": "",
        }),
        _ => json!({
            "id": id, "type": "message", "date": date,
            "from": null, "from_id": "user0", "text": "message from a deleted account",
        }),
    }
}

fn generate_text(rng: &mut impl Rng, index: usize) -> String {
    match index % 10 {
        0..=4 => format!("Normal message #{} with some text", index),
        5 => format!("Message with semicolons; here; and; there; index={}", index),
        6 => format!("Message with \"quotes\" and\nnewlines #{}", index),
        7 => {
            let emojis: String = (0..20)
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("Emoji spam: {} #{}", emojis, index)
        }
        8 => format!("Mixed: Hello Привет 你好 🌍 #{}", index),
        _ => "   ".to_string(),
    }
}
