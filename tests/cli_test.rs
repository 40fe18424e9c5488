use assert_cmd::prelude::*; // Add methods on commands
use std::process::Command; // Run programs

type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn round_trip(data: &[u8], bits: &str) -> STDRESULT {
    let compressed = Command::cargo_bin("lzwgc")?
        .arg("compress")
        .arg("-b").arg(bits)
        .write_stdin(data.to_vec())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expanded = Command::cargo_bin("lzwgc")?
        .arg("decompress")
        .arg("-b").arg(bits)
        .write_stdin(compressed)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(expanded, data);
    Ok(())
}

#[test]
fn round_trips_plain_text() -> STDRESULT {
    round_trip(b"I am Sam. Sam I am. I do not like this Sam I am.\n", "12")
}

#[test]
fn round_trips_with_a_wide_bit_width() -> STDRESULT {
    round_trip(b"TOBEORNOTTOBEORTOBEORNOT#\n", "17")
}

#[test]
fn round_trips_empty_input() -> STDRESULT {
    round_trip(b"", "12")
}

#[test]
fn debug_mode_reports_no_divergence_and_reproduces_input() -> STDRESULT {
    let data = b"the quick brown fox jumps over the lazy dog, repeatedly: the quick brown fox";
    Command::cargo_bin("lzwgc")?
        .arg("debug")
        .arg("-b").arg("10")
        .write_stdin(data.to_vec())
        .assert()
        .success()
        .stdout(data.as_slice());
    Ok(())
}

#[test]
fn rejects_out_of_range_bit_width() -> STDRESULT {
    Command::cargo_bin("lzwgc")?
        .arg("compress")
        .arg("-b").arg("25")
        .write_stdin(b"x".to_vec())
        .assert()
        .failure();
    Ok(())
}
