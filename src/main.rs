fn main() -> std::process::ExitCode {
    statuswatch_lib::run()
}
