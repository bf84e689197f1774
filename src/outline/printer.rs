use super::Title;
use std::io::{self, Write};

/// Write an indented bullet list of `titles`, two spaces per nesting depth.
///
/// Each line reads ` • <name> (<heading level>)`.
pub fn write_titles<W: Write>(w: &mut W, titles: &[Title], depth: usize) -> io::Result<()> {
    for title in titles {
        writeln!(
            w,
            "{} • {} ({})",
            " ".repeat(depth * 2),
            title.name,
            title.level
        )?;
        write_titles(w, &title.sub_titles, depth + 1)?;
    }
    Ok(())
}

/// Print the outline to stdout.
pub fn print_titles(titles: &[Title]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_titles(&mut lock, titles, 0)?;
    lock.flush()
}
