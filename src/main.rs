use std::process::ExitCode;

use font_sort::SortError;
use font_sort::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = font_sort::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            let code = e.downcast_ref::<SortError>().map_or(1, SortError::code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
