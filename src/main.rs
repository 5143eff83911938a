fn main() {
    corvid::uci::run();
}
