use std::io::Write;
use std::process::{Command, Stdio};

use corvid::board::movegen::parse_uci_move;
use corvid::board::Board;

#[test]
fn uci_smoke_test_returns_legal_move() {
    let exe = env!("CARGO_BIN_EXE_corvid");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    let input = b"uci\nisready\nposition startpos moves e2e4\ngo movetime 50\nquit\n";
    child.stdin.as_mut().unwrap().write_all(input).unwrap();

    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("uciok"));
    assert!(stdout.contains("readyok"));

    let bestmove = stdout
        .lines()
        .filter(|line| line.starts_with("bestmove"))
        .last()
        .expect("no bestmove found");
    let parts: Vec<&str> = bestmove.split_whitespace().collect();
    assert!(parts.len() >= 2, "bestmove missing move: {bestmove}");
    let mv = parts[1];
    assert_ne!(mv, "0000", "engine returned null move");

    let mut board = Board::startpos();
    let e2e4 = parse_uci_move(&mut board, "e2e4").unwrap();
    board.make_move(e2e4);

    assert!(
        parse_uci_move(&mut board, mv).is_ok(),
        "bestmove not legal in position: {mv}"
    );
}

#[test]
fn uci_reports_id_and_options_before_uciok() {
    let exe = env!("CARGO_BIN_EXE_corvid");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");

    child.stdin.as_mut().unwrap().write_all(b"uci\nquit\n").unwrap();
    let output = child.wait_with_output().expect("failed to read output");
    let stdout = String::from_utf8_lossy(&output.stdout);

    let uciok_line = stdout.lines().position(|l| l == "uciok");
    let id_line = stdout.lines().position(|l| l.starts_with("id name"));
    assert!(id_line.is_some() && uciok_line.is_some());
    assert!(id_line.unwrap() < uciok_line.unwrap());
}
