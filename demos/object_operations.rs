use r2_signer::S3;
use reqwest::{Method, StatusCode};

// Before running, export R2_ACCOUNT_ID, R2_ACCESS_KEY_ID, R2_SECRET_ACCESS_KEY
// and R2_BUCKET_NAME, and upload `demo/text.txt` first.
#[tokio::main]
async fn main() {
    let s3 = S3::from_env().unwrap();
    let client = reqwest::Client::new();

    // Get Information of Object such as content type and content length (bytes)
    let head = s3
        .build_signed_request(Method::HEAD, "demo/text.txt", None)
        .unwrap()
        .into_request()
        .unwrap();
    let res = client.execute(head).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("Content-Length").unwrap(), &"11");

    // Delete Object
    let delete = s3
        .build_signed_request(Method::DELETE, "demo/text.txt", None)
        .unwrap()
        .into_request()
        .unwrap();
    let res = client.execute(delete).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
