//! `mcsign sign` command implementation.

use std::io::{self, Write};

use clap::Args;

use super::request::RequestArgs;
use crate::error::CliError;

/// Arguments for the sign command.
#[derive(Args)]
pub(crate) struct SignArgs {
    #[command(flatten)]
    pub(crate) request: RequestArgs,
}

impl SignArgs {
    /// Execute the sign command, writing the header value to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or signed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (signer, request) = self.request.prepare()?;
        let header = signer.authorization_header(&request)?;
        writeln!(io::stdout(), "{header}")?;
        Ok(())
    }
}
