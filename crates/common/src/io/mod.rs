//! User-facing terminal output.
//!
//! Unlike `println!`, the `sh_*` macros return an [`io::Result`] instead of panicking when the
//! terminal goes away, e.g. on a closed pipe.

use std::{
    fmt,
    io::{self, Write},
};

mod macros;

/// Writes one line to stdout.
pub fn println(args: fmt::Arguments<'_>) -> io::Result<()> {
    write_line(&mut io::stdout().lock(), args)
}

/// Writes one line to stderr.
pub fn eprintln(args: fmt::Arguments<'_>) -> io::Result<()> {
    write_line(&mut io::stderr().lock(), args)
}

/// Writes `args` and a newline to `out`, then flushes it.
pub fn write_line<W: Write>(out: &mut W, args: fmt::Arguments<'_>) -> io::Result<()> {
    out.write_fmt(args)?;
    out.write_all(b"\n")?;
    out.flush()
}
