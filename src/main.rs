fn main() {
    std::process::exit(hemalens_lib::run());
}
