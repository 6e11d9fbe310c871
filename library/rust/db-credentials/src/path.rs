/// backend と role 名から認証情報の読み取りパスを組み立てる。
///
/// 各セグメントの先頭と末尾の `/` だけを取り除き、内部の区切りや文字種は変更しない。
pub fn credentials_path(backend: &str, name: &str) -> String {
    format!("{}/creds/{}", backend.trim_matches('/'), name.trim_matches('/'))
}
