/// Seconds since midnight for a 24-hour clock time, as stored by DAYTIME answers.
///
/// ```
/// use surveylog_types::hhmmss;
///
/// assert_eq!(hhmmss(7, 30, 0), 27_000);
/// ```
pub fn hhmmss(hours: i64, minutes: i64, seconds: i64) -> i64 {
    hours * 3600 + minutes * 60 + seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts() {
        assert_eq!(hhmmss(0, 0, 0), 0);
        assert_eq!(hhmmss(1, 0, 0), 3600);
        assert_eq!(hhmmss(23, 59, 59), 86_399);
    }
}
