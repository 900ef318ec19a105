use std::fs::File;
use std::io::{self, BufReader};
use std::process::exit;

use uvm::Console;

const BANNER: &str = "\
===============================
  UVM console
===============================
Type `help` for the command list.";

fn main() {

  #[cfg(feature = "trace_computation")]
  println!("Computation Tracing ENABLED");

  let stdout = io::stdout();
  let mut console = Console::new(stdout.lock());

  // With a path argument, run that file as a script; otherwise read commands from stdin.
  let result =
    match std::env::args().nth(1) {

      Some(path) => {
        match File::open(&path) {
          Ok(file) => console.run(BufReader::new(file), false),
          Err(e)   => {
            eprintln!("Error: cannot open {}: {}", path, e);
            exit(1);
          }
        }
      }

      None => {
        println!("{}", BANNER);
        let stdin = io::stdin();
        console.run(stdin.lock(), true)
      }

    };

  if let Err(e) = result {
    eprintln!("Error: {}", e);
    exit(1);
  }
}
