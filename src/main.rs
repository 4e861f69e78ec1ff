use std::{
    env,
    fs::{self, create_dir, read_to_string},
    path::PathBuf,
    rc::Rc,
    time::Instant,
};

use inkwell::context::Context;
use quartzc::{compiler::compiler::compile, display_error, lexer::lexer::tokenize, parser::parser::parse};

fn main() {
    if !PathBuf::from("build").exists() {
        create_dir("build").unwrap();
    } else {
        for entry in fs::read_dir("build").unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            fs::remove_file(path).unwrap();
        }
    }

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains("/") {
        file_path.split("/").last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let mut path_buf_string = env::current_dir().unwrap().into_os_string();
    path_buf_string.push("/");
    path_buf_string.push(file_path);
    let file_contents = read_to_string(path_buf_string.clone()).expect("Failed to read file!");

    let tokens = match tokenize(file_contents, Some(String::from(file_name))) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(error, PathBuf::from(path_buf_string));
            panic!()
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let ast = match parse(tokens, Rc::new(String::from(file_name))) {
        Ok(ast) => ast,
        Err(error) => {
            display_error(error, PathBuf::from(path_buf_string));
            panic!()
        }
    };

    println!("Parsed in {:?}", parse_start.elapsed());

    let compile_start = Instant::now();
    let context = Context::create();
    if let Err(error) = compile(&ast, PathBuf::from("build/out.ll"), file_name, &context) {
        display_error(error, PathBuf::from(path_buf_string));
        panic!()
    }

    println!("Compiled in {:?}", compile_start.elapsed());
    println!("Total time for IR generation: {:?}", start.elapsed());
}
