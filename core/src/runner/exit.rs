pub fn normalize_exit(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else if let Some(sig) = status.signal() {
            128 + sig
        } else {
            1
        }
    }
    #[cfg(windows)]
    {
        status.code().unwrap_or(1)
    }
}

/// Maps a failure count onto a process exit code that can't wrap to success.
pub fn process_exit_code(count: u32) -> i32 {
    match count {
        0 => 0,
        n => n.min(255) as i32,
    }
}
