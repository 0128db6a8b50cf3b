/// Prints a line to stdout, returning an [`std::io::Result`].
#[macro_export]
macro_rules! sh_println {
    () => {
        $crate::io::println(format_args!(""))
    };
    ($($args:tt)*) => {
        $crate::io::println(format_args!($($args)*))
    };
}

/// Prints a line to stderr, returning an [`std::io::Result`].
#[macro_export]
macro_rules! sh_eprintln {
    () => {
        $crate::io::eprintln(format_args!(""))
    };
    ($($args:tt)*) => {
        $crate::io::eprintln(format_args!($($args)*))
    };
}
