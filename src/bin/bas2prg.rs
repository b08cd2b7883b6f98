fn main() {
    std::process::exit(prg::term::bas2prg() as i32)
}
