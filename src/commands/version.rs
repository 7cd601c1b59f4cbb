//! Command: print version information.

/// Version string: `DOTFILES_VERSION` at build time, else the crate version.
pub const VERSION: &str = match option_env!("DOTFILES_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Print the dotfiles version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("dotfiles {VERSION}");
}
