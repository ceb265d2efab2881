#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

fn main() {
    if let Err(e) = attendance_checker::run() {
        log::error!("Attendance check aborted: {}", e);
        std::process::exit(1);
    }
}
