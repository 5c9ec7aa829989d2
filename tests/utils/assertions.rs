/// Custom assertions for contract testing

/// Assert a `try_` client call failed with the given contract error
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $error:expr) => {
        assert_eq!($result, Err(Ok($error)), "unexpected contract result")
    };
}

/// Assert a `try_` client call was rejected by the host rather than by a
/// contract error code (bad signature, missing auth, ...)
#[macro_export]
macro_rules! assert_host_rejected {
    ($result:expr) => {
        match $result {
            Err(Err(_)) => {}
            other => panic!("expected host rejection, got {:?}", other),
        }
    };
}
