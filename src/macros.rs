// Logging goes through `log` only with the `log` feature. Without it the
// arguments are still type checked but nothing is emitted.

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)+) => { ::log::trace!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)+) => {{ let _ = format_args!($($arg)+); }};
}

#[cfg(feature = "log")]
macro_rules! debug {
    ($($arg:tt)+) => { ::log::debug!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)+) => {{ let _ = format_args!($($arg)+); }};
}

#[cfg(feature = "log")]
macro_rules! warn {
    ($($arg:tt)+) => { ::log::warn!($($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($arg:tt)+) => {{ let _ = format_args!($($arg)+); }};
}
