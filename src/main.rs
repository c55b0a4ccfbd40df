fn main() {
    ngenv::app::cli::run();
}
