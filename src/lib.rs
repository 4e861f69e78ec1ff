#![allow(clippy::module_inception)]

use std::{fs, path::PathBuf, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

pub fn get_line_at_position(file: PathBuf, position: u32) -> Option<(usize, String, usize)> {
    let content = fs::read_to_string(&file).ok()?;
    let pos = position as usize;

    if pos >= content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

pub fn display_error(error: Error, file: PathBuf) {
    /*
        error: message
        -> final.qz
           |
        20 | let a = #;
           | --------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", file.as_os_str().to_string_lossy());

    let Some((line, line_text, line_pos)) = get_line_at_position(file, position.0) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    #[test]
    fn test_get_line_at_position() {
        let dir = std::env::temp_dir().join("quartzc_lib_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lines.qz");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "let a: i32 = 1;\nlet b: i32 = 2;\n").unwrap();

        let (line_number, line, line_pos) = super::get_line_at_position(path.clone(), 4).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "let a: i32 = 1;\n");
        assert_eq!(line_pos, 4);

        let (line_number, line, line_pos) = super::get_line_at_position(path, 20).unwrap();
        assert_eq!(line_number, 2);
        assert_eq!(line, "let b: i32 = 2;\n");
        assert_eq!(line_pos, 4);
    }

    #[test]
    fn test_get_line_at_position_out_of_range() {
        let dir = std::env::temp_dir().join("quartzc_lib_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("short.qz");
        std::fs::write(&path, "let a: i32 = 1;\n").unwrap();

        assert!(super::get_line_at_position(path, 999).is_none());
    }
}
