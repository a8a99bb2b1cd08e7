/// Trait for writing console messages.
pub trait ConsoleWriter: Send {
    fn config_entry(&mut self, key: &str, value: &str);
    fn display(&mut self, display_id: &str, text: &str);
    fn stdout(&mut self, text: &str);
    fn stderr(&mut self, text: &str);
    fn reply_ok(&mut self, execution_count: u64);
    fn reply_error(&mut self, execution_count: u64, ename: &str, evalue: &str);
}

/// Macro to generate both ANSI and Plain ConsoleWriters
macro_rules! console_writer_impl {
    (
        $StyledWriter:ident, $PlainWriter:ident, $out_field:ident,
        {
            $(
                fn $method:ident(&mut self, $($arg_name:ident: $arg_ty:ty),*) {
                    styled: $styled_fmt:expr,
                    plain: $plain_fmt:expr
                }
            )*
        }
    ) => {
        pub struct $StyledWriter<W: std::io::Write> {
            $out_field: W,
        }

        pub struct $PlainWriter<W: std::io::Write> {
            $out_field: W,
        }

        impl<W: std::io::Write> $StyledWriter<W> {
            pub fn new($out_field: W) -> Self {
                Self { $out_field }
            }
        }

        impl<W: std::io::Write> $PlainWriter<W> {
            pub fn new($out_field: W) -> Self {
                Self { $out_field }
            }
        }

        impl<W: std::io::Write + Send> ConsoleWriter for $StyledWriter<W> {
            $(
                fn $method(&mut self, $($arg_name: $arg_ty),*) {
                    let _ = writeln!(self.$out_field, $styled_fmt, $($arg_name),*);
                }
            )*
        }

        impl<W: std::io::Write + Send> ConsoleWriter for $PlainWriter<W> {
            $(
                fn $method(&mut self, $($arg_name: $arg_ty),*) {
                    let _ = writeln!(self.$out_field, $plain_fmt, $($arg_name),*);
                }
            )*
        }
    };
}

const BOLD_RED: &str = "\x1b[1;31m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

console_writer_impl!(
    AnsiConsoleWriter, PlainConsoleWriter, out, {
        fn config_entry(&mut self, key: &str, value: &str) {
            styled: "{DIM}{}:{RESET} {}",
            plain: "{}: {}"
        }
        fn display(&mut self, display_id: &str, text: &str) {
            styled: "{DIM}[{}]{RESET}\n{}",
            plain: "[{}]\n{}"
        }
        fn stdout(&mut self, text: &str) {
            styled: "{}",
            plain: "{}"
        }
        fn stderr(&mut self, text: &str) {
            styled: "{BOLD_RED}{}{RESET}",
            plain: "{}"
        }
        fn reply_ok(&mut self, execution_count: u64) {
            styled: "{BOLD_GREEN}[{}] ok{RESET}",
            plain: "[{}] ok"
        }
        fn reply_error(&mut self, execution_count: u64, ename: &str, evalue: &str) {
            styled: "{BOLD_RED}[{}] {}: {}{RESET}",
            plain: "[{}] {}: {}"
        }
    }
);
