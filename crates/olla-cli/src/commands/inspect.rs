//! Inspect command - ask a vision model about an image file.

use olla_client::Image;
use std::path::Path;

use super::Server;

pub(crate) const DEFAULT_MODEL: &str = "llava:13b";
pub(crate) const DEFAULT_QUERY: &str = "What's in this image?";

// Low temperature keeps descriptions literal.
const TEMPERATURE: f32 = 0.1;

pub(crate) async fn run(
    server: &Server,
    image: &Path,
    message: &str,
    model: &str,
) -> miette::Result<()> {
    let image = load_image(image).await?;

    let client = server.client(model);
    let reply = client.ask(message, &[image], TEMPERATURE).await;
    super::unload(&client).await;

    let reply = reply.map_err(|e| miette::miette!("Inspect failed: {}", e))?;
    println!("{}", reply.message);

    Ok(())
}

async fn load_image(path: &Path) -> miette::Result<Image> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| miette::miette!("Failed to read image {}: {}", path.display(), e))?;
    Ok(Image::Bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_image_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let image = load_image(file.path()).await.unwrap();
        assert_eq!(image, Image::Bytes(vec![0x89, b'P', b'N', b'G']));
        assert_eq!(image.encode(), "iVBORw==");
    }

    #[tokio::test]
    async fn test_load_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_image(&dir.path().join("nope.png")).await;
        assert!(result.is_err());
    }
}
