//! Panic payloads are error values, so an installed hook has to downcast
//! them to print the message.

use std::{
    io,
    panic::{self, AssertUnwindSafe},
    sync::{Mutex, PoisonError},
};

use errpick::{ComposedError, report_panicf};

static SEEN: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn record(message: String) {
    SEEN.lock().unwrap_or_else(PoisonError::into_inner).push(message);
}

#[test]
fn hook_recovers_payload_messages() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        if let Some(error) = payload.downcast_ref::<ComposedError>() {
            record(error.to_string());
        } else if let Some(error) = payload.downcast_ref::<io::Error>() {
            record(error.to_string());
        } else {
            default_hook(info);
        }
    }));

    let plain = panic::catch_unwind(|| {
        errpick::report_panic(Some(io::Error::other("error info")));
    });
    let composed = panic::catch_unwind(AssertUnwindSafe(|| {
        let result: Result<(), io::Error> = Err(io::Error::other("error info"));
        report_panicf!(&result, "format {}", "custom error info");
    }));
    let _ = panic::take_hook();

    assert!(plain.is_err());
    assert!(composed.is_err());

    // The payloads carry no string, which is why the hook is needed at all.
    let payload = plain.unwrap_err();
    assert!(payload.downcast_ref::<&str>().is_none());
    assert!(payload.downcast_ref::<String>().is_none());

    assert_eq!(
        *SEEN.lock().unwrap_or_else(PoisonError::into_inner),
        ["error info", "format custom error info (error info)"]
    );
}
