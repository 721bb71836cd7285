//! QCP CLI — prove knowledge of a chunk behind a commitment
//!
//! Usage: qcp <chunk_base64> <chunk_id>
//!
//! On success prints a single JSON object on stdout:
//!   {"chunk_id": ..., "entropy": ..., "commitment": ..., "proof": ...}
//! All diagnostics go to stderr.
//!
//! Exit codes:
//!   0  success
//!   1  wrong argument count
//!   2  unexpected internal error
//!   3  invalid base64 payload
//!   4  chunk exceeds the 10 MB size cap

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use qcp_core::{pipeline, QcpError};
use std::env;
use std::process;

const EXIT_USAGE: i32 = 1;
const EXIT_INTERNAL: i32 = 2;
const EXIT_BAD_BASE64: i32 = 3;
const EXIT_TOO_LARGE: i32 = 4;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: qcp <chunk_base64> <chunk_id>");
        process::exit(EXIT_USAGE);
    }
    let chunk_b64 = &args[1];
    let chunk_id = &args[2];

    // Cheap validations first; no matrix or proof work before they pass.
    let chunk = match BASE64.decode(chunk_b64) {
        Ok(bytes) => bytes,
        Err(_) => {
            eprintln!("Error: invalid base64 encoding in chunk data");
            process::exit(EXIT_BAD_BASE64);
        }
    };
    if chunk.len() > pipeline::MAX_CHUNK_BYTES {
        eprintln!("Error: chunk too large for processing");
        process::exit(EXIT_TOO_LARGE);
    }

    match pipeline::run(&chunk, chunk_id).await {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(EXIT_INTERNAL);
            }
        },
        Err(QcpError::ChunkTooLarge { .. }) => {
            eprintln!("Error: chunk too large for processing");
            process::exit(EXIT_TOO_LARGE);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_INTERNAL);
        }
    }
}
