fn main() {
    combinatorial::cli::run();
}
