use chrono::Duration;
use r2_signer::S3;
use reqwest::StatusCode;

// Before running, export R2_ACCOUNT_ID, R2_ACCESS_KEY_ID, R2_SECRET_ACCESS_KEY
// and R2_BUCKET_NAME for a bucket you can write to.
#[tokio::main]
async fn main() {
    let s3 = S3::from_env().unwrap();

    let key = "demo/text.txt";
    let content = "Hello world";

    // Upload by PUT presigned url
    let upload = s3
        .presign_upload(key, "text/plain", Duration::seconds(3600))
        .unwrap();
    let res = reqwest::Client::new()
        .put(upload.as_str())
        .header("content-type", "text/plain")
        .body(content)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Download by GET presigned url
    let download = s3.presign_download(key, Duration::seconds(3600)).unwrap();
    let res = reqwest::Client::new()
        .get(download.as_str())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), content);
}
