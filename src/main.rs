fn main() -> Result<(), eframe::Error> {
    // Set up logging; filter with RUST_LOG
    env_logger::init();

    tube_joint_designer::run_app()
}
