use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    agentdeck::cli::main()
}
