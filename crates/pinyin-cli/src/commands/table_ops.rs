use std::path::Path;

use pinyin_core::normalize::normalize_key;
use pinyin_core::table::lookup;
use pinyin_core::PhraseTable;

fn open_table(table_file: &str) -> PhraseTable {
    die!(
        PhraseTable::open(Path::new(table_file)),
        "Error opening phrase table: {}"
    )
}

pub fn info(table_file: &str) {
    let table = open_table(table_file);
    let file_size = std::fs::metadata(table_file).map(|m| m.len()).unwrap_or(0);

    println!("Phrase table: {table_file}");
    println!("File size:  {:.1} MB", file_size as f64 / 1_048_576.0);
    println!("Keys:       {}", table.len());
    println!("Phrases:    {}", table.phrase_count());

    let sample_keys = ["nihao", "zhongguo", "beijing", "xian"];
    println!();
    println!("Sample lookups:");
    for key in &sample_keys {
        match table.get(key) {
            Some(phrases) => {
                let shown: Vec<&str> = phrases.iter().take(5).map(String::as_str).collect();
                println!("  {key} → {}", shown.join(", "));
            }
            None => println!("  {key} → (not found)"),
        }
    }
}

/// Exact lookup; the query is normalized first, so `"Ni hao"` finds `nihao`.
pub fn lookup(table_file: &str, pinyin: &str) {
    let table = open_table(table_file);
    let key = normalize_key(pinyin);
    match table.get(&key) {
        Some(phrases) => {
            println!("{key}: {} phrases", phrases.len());
            for (rank, phrase) in phrases.iter().enumerate() {
                println!("  {:>2}. {phrase}", rank + 1);
            }
        }
        None => println!("{key}: not found"),
    }
}

pub fn candidates(table_file: &str, buffer: &str, n: usize) {
    let table = open_table(table_file);
    let keys = lookup::matching_keys(&table, buffer, None);
    let phrases = lookup::candidates(&table, buffer, None);
    if phrases.is_empty() {
        println!("{buffer}: no candidates");
        return;
    }
    println!(
        "{buffer}: {} candidates from {} keys",
        phrases.len(),
        keys.len()
    );
    for (rank, phrase) in phrases.iter().take(n).enumerate() {
        println!("  {:>2}. {phrase}", rank + 1);
    }
    for (key, kind) in keys.iter().take(n) {
        println!("  [{kind:?}] {key}");
    }
}
