use std::io::Read;

use fungen_core::JobRequest;
use fungen_logging::fungen_warn;

/// Reads the job description. Unreadable or malformed input yields the
/// empty request so the run can still report a meaningful error later.
pub fn read_job_request(mut reader: impl Read) -> JobRequest {
    let mut raw = String::new();
    if let Err(err) = reader.read_to_string(&mut raw) {
        fungen_warn!("Failed to read input: {}", err);
        return JobRequest::default();
    }
    match JobRequest::parse(&raw) {
        Ok(request) => request,
        Err(err) => {
            fungen_warn!("{}", err);
            JobRequest::default()
        }
    }
}
