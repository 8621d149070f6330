//! Styled console output for operator commands.
//!
//! Output uses padded status blocks and bordered tables:
//!
//! ```text
//!
//!  [OK] Admin user created successfully!
//!
//!  ------------------- ------------
//!   Email               Role
//!  ------------------- ------------
//!   admin@example.com   ROLE_ADMIN
//!  ------------------- ------------
//!
//!  ! [NOTE] You can now log in with these credentials
//!
//! ```
//!
//! A styled console colours the status tags; `colored` honours `NO_COLOR`,
//! `CLICOLOR` and `CLICOLOR_FORCE`.

use std::io::{self, Write};

use colored::{Color, Colorize};

/// Writes status blocks and tables to an underlying writer.
#[derive(Debug)]
pub struct Console<W> {
    out: W,
    styled: bool,
}

impl<W: Write> Console<W> {
    /// Plain output with no escape sequences.
    pub fn new(out: W) -> Self {
        Self { out, styled: false }
    }

    /// Output with coloured status tags, for a terminal.
    pub fn styled(out: W) -> Self {
        Self { out, styled: true }
    }

    /// Consume the console and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// ` [OK] message`
    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.block(" ", "OK", Color::Green, message)
    }

    /// ` [ERROR] message`
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.block(" ", "ERROR", Color::Red, message)
    }

    /// ` ! [NOTE] message`
    pub fn note(&mut self, message: &str) -> io::Result<()> {
        self.block(" ! ", "NOTE", Color::Yellow, message)
    }

    fn block(&mut self, lead: &str, tag: &str, color: Color, message: &str) -> io::Result<()> {
        let tag = format!("[{tag}]");
        let tag = if self.styled {
            tag.color(color).bold().to_string()
        } else {
            tag
        };
        writeln!(self.out)?;
        writeln!(self.out, "{lead}{tag} {message}")?;
        writeln!(self.out)
    }

    /// Render a bordered table. Column widths fit the widest cell.
    pub fn table<R>(&mut self, headers: &[&str], rows: &[R]) -> io::Result<()>
    where
        R: AsRef<[String]>,
    {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join(" ");
        let render = |cells: &[&str]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!(" {cell:<width$} "))
                .collect::<Vec<_>>()
                .join(" ")
        };

        writeln!(self.out, " {border}")?;
        writeln!(self.out, " {}", render(headers).trim_end())?;
        writeln!(self.out, " {border}")?;
        for row in rows {
            let cells: Vec<&str> = row.as_ref().iter().map(String::as_str).collect();
            writeln!(self.out, " {}", render(&cells).trim_end())?;
        }
        writeln!(self.out, " {border}")
    }
}
