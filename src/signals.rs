use crate::cancellation::Cancellation;

/// Raises the given cancellation flag when the process receives Ctrl-C.
pub fn handle_ctrl_c(cancellation: &Cancellation) {
    let handle = cancellation.clone();
    ctrlc::set_handler(move || {
        handle.cancel();
    })
    .expect("Error setting Ctrl-C handler");
}
