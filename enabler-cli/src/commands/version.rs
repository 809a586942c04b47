//! Version command implementation

pub fn execute() {
    println!("enabler {}", env!("CARGO_PKG_VERSION"));
}
