//! dutybot main entrypoint.

use dutybot::run;
use dutybot::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(messages::describe(&e));
        std::process::exit(1);
    }
}
