#[macro_export]
macro_rules! debug_panic {
    ($arg: expr) => {
        if cfg!(debug_assertions) && $crate::const_config::PANIC_ON_RARE_ERR {
            panic!(
                "Rare error detected! Panicking to make it more obvious: {:?}",
                $arg
            )
        }
    };
}

#[macro_export]
macro_rules! internal_error {
    ($arg: expr) => {{
        let internal_error_msg = format!(
            "{}\ninternal error: {}:{}:{}",
            $arg,
            file!(),
            line!(),
            column!()
        );
        tracing::error!(?internal_error_msg);
        internal_error_msg
    }};
}

/// For errors with no known cause under normal operation where execution can
/// still continue
#[macro_export]
macro_rules! log_err_as_error {
    ($arg: expr) => {
        if let Err(err) = $arg {
            tracing::error!(?err);
            $crate::debug_panic!(err);
        }
    };
}

/// For errors expected during normal operation that we still want to see
#[macro_export]
macro_rules! log_err_as_warn {
    ($arg: expr) => {
        if let Err(mishap) = $arg {
            tracing::warn!(?mishap);
        }
    };
}
