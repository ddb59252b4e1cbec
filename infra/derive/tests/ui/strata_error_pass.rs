use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
#[error("backend said: {0}")]
pub struct BackendError(String);

#[strata_derive::strata_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Read failed at {path}{}: {source}", format_context(.context))]
    Read { path: Cow<'static, str>, source: BackendError, context: Option<Cow<'static, str>> },

    #[error("Write failed at {path}{}: {source}", format_context(.context))]
    Write { path: Cow<'static, str>, source: BackendError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open() -> Result<(), DemoError> {
    let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
    io.context("opening demo file")?;
    Ok(())
}

fn main() {
    let err = open().unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert!(err.to_string().contains("(opening demo file)"));

    let read = DemoError::Read {
        path: "a/b".into(),
        source: BackendError("gone".to_owned()),
        context: None,
    };
    assert_eq!(read.kind(), "Read");

    let internal: DemoError = "boom".into();
    assert_eq!(internal.kind(), "Internal");

    let with_ctx: Result<(), DemoError> = Err(DemoError::from(String::from("late")));
    let with_ctx = with_ctx.context("shutdown").unwrap_err();
    assert!(with_ctx.to_string().ends_with("(shutdown): late"));
}
