use env_logger::Env;

/// 初始化 logger，`RUST_LOG` 優先；未設定時預設 info，`--debug` 時為 debug
pub fn init(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    // 重複初始化（例如測試中）時忽略錯誤
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
