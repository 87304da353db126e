//! Walk a failure up through the data-access and logic layers and print it
//! if it is rooted in the "no rows" sentinel.

use std::io::{self, Write};

use annotated_echo::failure::layers::{inspect, logic};
use annotated_echo::failure::NO_ROWS;

fn main() -> io::Result<()> {
    let failure = logic();

    let mut stdout = io::stdout().lock();
    if inspect(&failure, &NO_ROWS, &mut stdout)? {
        stdout.flush()?;
    }
    Ok(())
}
