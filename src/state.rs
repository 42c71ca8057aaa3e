/// Where the parser is within a single section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    AwaitingEntryStart,
    StatusOrHeaderExpected,
    BodyCollecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadStage {
    AwaitingHeaders,
    ReceivingBody,
    Eof,
}
