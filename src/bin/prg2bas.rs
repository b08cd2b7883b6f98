fn main() {
    std::process::exit(prg::term::prg2bas() as i32)
}
