use crate::auth::dto::{ValidateTokensRequest, ValidateTokensResponse};
use crate::error::AppError;
use crate::token::{TokenKind, TokenVerdict};

/// Turns the remote verdicts into an accept/reject decision.
///
/// Only kinds the caller actually asked about are inspected. Every failing
/// condition contributes its own line (no early return), access lines
/// before refresh lines, all joined by newline into a single
/// authentication error.
pub fn validate_tokens_response(
    requested: &ValidateTokensRequest,
    response: &ValidateTokensResponse,
) -> Result<(), AppError> {
    let mut lines: Vec<String> = Vec::new();

    if requested.access_token.is_some() {
        collect_verdict_errors(TokenKind::Access, response.access_token.as_ref(), &mut lines);
    }
    if requested.refresh_token.is_some() {
        collect_verdict_errors(
            TokenKind::Refresh,
            response.refresh_token.as_ref(),
            &mut lines,
        );
    }

    if lines.is_empty() {
        Ok(())
    } else {
        Err(AppError::Unauthorized(lines.join("\n")))
    }
}

fn collect_verdict_errors(kind: TokenKind, verdict: Option<&TokenVerdict>, lines: &mut Vec<String>) {
    // A missing verdict for a requested kind is a remote contract breach;
    // it rejects rather than panics.
    let Some(verdict) = verdict else {
        lines.push(format!("{} token is invalid!", kind.label()));
        return;
    };
    if verdict.is_expired {
        lines.push(format!("{} token is expired!", kind.label()));
    }
    if !verdict.is_valid {
        lines.push(format!("{} token is invalid!", kind.label()));
    }
}
