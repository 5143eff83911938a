//! Line-level UCI command parsing: splits an input line into a recognized
//! command, deferring value interpretation (times, depths) to `GoParams`.

#[derive(Debug, Clone)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    Perft(u32),
    SetOption(Vec<String>),
    Stop,
    PonderHit,
    Quit,
    Unknown(String),
}

#[derive(Default, Debug, Clone, Copy)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movetime: Option<u64>,
    pub movestogo: Option<u64>,
    pub depth: Option<i32>,
    pub nodes: Option<u64>,
    pub ponder: bool,
    pub infinite: bool,
}

#[inline]
fn parse_next<T: std::str::FromStr>(parts: &[&str], i: usize) -> Option<T> {
    parts.get(i + 1).and_then(|v| v.parse::<T>().ok())
}

#[must_use]
pub fn parse_go_params(parts: &[String]) -> GoParams {
    let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
    let mut params = GoParams::default();
    let mut i = 1;

    while i < parts.len() {
        let consumed = match parts[i] {
            "wtime" => {
                params.wtime = parse_next(&parts, i);
                2
            }
            "btime" => {
                params.btime = parse_next(&parts, i);
                2
            }
            "winc" => {
                params.winc = parse_next(&parts, i);
                2
            }
            "binc" => {
                params.binc = parse_next(&parts, i);
                2
            }
            "movetime" => {
                params.movetime = parse_next(&parts, i);
                2
            }
            "movestogo" => {
                params.movestogo = parse_next(&parts, i);
                2
            }
            "nodes" => {
                params.nodes = parse_next(&parts, i);
                2
            }
            "depth" => {
                params.depth = parse_next(&parts, i);
                2
            }
            "ponder" => {
                params.ponder = true;
                1
            }
            "infinite" => {
                params.infinite = true;
                1
            }
            _ => 1,
        };
        i += consumed;
    }
    params
}

#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<_>>();

    let cmd = match parts[0] {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "perft" => {
            let depth = parts.get(1).and_then(|v| v.parse::<u32>().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "setoption" => UciCommand::SetOption(owned_parts()),
        "stop" => UciCommand::Stop,
        "ponderhit" => UciCommand::PonderHit,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_go_with_time_controls() {
        let line: Vec<String> = "go wtime 10000 btime 9000 winc 100 binc 100"
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let params = parse_go_params(&line);
        assert_eq!(params.wtime, Some(10_000));
        assert_eq!(params.btime, Some(9_000));
        assert_eq!(params.winc, Some(100));
        assert_eq!(params.binc, Some(100));
    }

    #[test]
    fn parses_go_depth() {
        let line: Vec<String> = "go depth 12".split_whitespace().map(str::to_string).collect();
        assert_eq!(parse_go_params(&line).depth, Some(12));
    }

    #[test]
    fn unknown_command_is_preserved() {
        match parse_uci_command("banana") {
            Some(UciCommand::Unknown(s)) => assert_eq!(s, "banana"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
