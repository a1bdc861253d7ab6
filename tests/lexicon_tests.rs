// Integration tests for lexicon.txt generation

mod common;

use anyhow::Result;
use common::read_lines;
use kaldi_prep::{
    write_lexicon, Error, Lexicon, LexiconWriter, Pronunciation, TextEncoding, WriterConfig,
};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_lexicon_sorted_pairs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let out = temp_dir.path().join("dict");

    write_lexicon(
        vec![
            ("world", "W ER L D"),
            ("hello", "HH EH L OW"),
            ("hello", "HH AH L OW"),
        ],
        &out,
    )?;

    assert_eq!(
        fs::read_to_string(out.join("lexicon.txt"))?,
        "hello HH AH L OW\nhello HH EH L OW\nworld W ER L D\n"
    );
    Ok(())
}

#[test]
fn test_variants_become_adjacent_lines() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut map: HashMap<&str, Pronunciation> = HashMap::new();
    map.insert("zebra", "Z IY B R AH".into());
    map.insert("word", ["EY", "AH"].into());
    map.insert("apple", "AE P AH L".into());

    LexiconWriter::default().write(&Lexicon::from_map(map), temp_dir.path())?;

    assert_eq!(
        read_lines(temp_dir.path(), "lexicon.txt")?,
        vec!["apple AE P AH L", "word AH", "word EY", "zebra Z IY B R AH"]
    );
    Ok(())
}

#[test]
fn test_json_lexicon_with_bad_value() -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(r#"{"one": "W AH N", "two": ["T UW"], "three": 3}"#)?;

    match Lexicon::from_json(&value) {
        Err(Error::Pronunciation {
            word,
            value,
            type_name,
        }) => {
            assert_eq!(word, "three");
            assert_eq!(value, "3");
            assert_eq!(type_name, "number");
        }
        other => panic!("expected pronunciation error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_overwrites_existing_lexicon() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("lexicon.txt"), "old OW L D\nolder OW L D ER\n")?;

    write_lexicon(vec![("new", "N UW")], temp_dir.path())?;

    assert_eq!(read_lines(temp_dir.path(), "lexicon.txt")?, vec!["new N UW"]);
    Ok(())
}

#[test]
fn test_empty_lexicon_writes_empty_file() -> Result<()> {
    let temp_dir = TempDir::new()?;

    write_lexicon(Vec::<(String, String)>::new(), temp_dir.path())?;

    assert_eq!(fs::read_to_string(temp_dir.path().join("lexicon.txt"))?, "");
    Ok(())
}

#[test]
fn test_latin1_lexicon_rejects_unencodable_word() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let writer = LexiconWriter::new(WriterConfig::default().with_encoding(TextEncoding::Latin1));
    let lexicon = Lexicon::from_pairs(vec![("naïve", "N AY IY V"), ("東京", "T OW K Y OW")]);

    let result = writer.write(&lexicon, temp_dir.path());

    assert!(matches!(result, Err(Error::Encoding { character: '東', .. })));
    Ok(())
}
