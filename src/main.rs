#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    lesson_pdf_server::run().await
}
