// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::WorkerFailure;

/// One worker's completion signal: `Ok(())` on success, the failure otherwise.
pub type Outcome = Result<(), WorkerFailure>;
