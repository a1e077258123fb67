//===========================================================================//

// Returns early from the enclosing function with an `io::Error` of the given
// kind and a formatted message.
macro_rules! io_bail {
    ($kind:ident, $($arg:tt)+) => {
        return Err(::std::io::Error::new(
            ::std::io::ErrorKind::$kind,
            format!($($arg)+),
        ))
    };
}

macro_rules! invalid_data {
    ($($arg:tt)+) => {
        io_bail!(InvalidData, $($arg)+)
    };
}

macro_rules! invalid_input {
    ($($arg:tt)+) => {
        io_bail!(InvalidInput, $($arg)+)
    };
}

//===========================================================================//
