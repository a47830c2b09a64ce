use std::process::ExitCode;

use goth::scaffold::CreateError;
use goth::ui::output;

fn main() -> ExitCode {
    match goth::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            if let Some(create) = err.downcast_ref::<CreateError>() {
                if create.target_may_be_partial() {
                    output::error(
                        "the project directory may be partially populated; remove it before retrying",
                    );
                }
            }
            ExitCode::FAILURE
        }
    }
}
