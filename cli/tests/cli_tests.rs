#[test]
fn dist() {
    trycmd::TestCases::new()
        .case("tests/dist/*.toml")
        .env("CHARMAT_ALLOW_STDIN", "true")
        .default_bin_name("charmat");
}

#[test]
fn freqs() {
    trycmd::TestCases::new()
        .case("tests/freqs/*.toml")
        .env("CHARMAT_ALLOW_STDIN", "true")
        .default_bin_name("charmat");
}

#[test]
fn stat() {
    trycmd::TestCases::new()
        .case("tests/stat/*.toml")
        .env("CHARMAT_ALLOW_STDIN", "true")
        .default_bin_name("charmat");
}

#[test]
fn translate() {
    trycmd::TestCases::new()
        .case("tests/translate/*.toml")
        .env("CHARMAT_ALLOW_STDIN", "true")
        .default_bin_name("charmat");
}

#[test]
fn view() {
    trycmd::TestCases::new()
        .case("tests/view/*.toml")
        .env("CHARMAT_ALLOW_STDIN", "true")
        .default_bin_name("charmat");
}
