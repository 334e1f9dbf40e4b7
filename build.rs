fn main() {
    #[cfg(target_os = "windows")]
    {
        let resource_script = std::path::Path::new("resources/windows/server-editor.rc");
        println!("cargo:rerun-if-changed={}", resource_script.display());

        if resource_script.exists() {
            if let Err(error) =
                embed_resource::compile(resource_script, embed_resource::NONE).manifest_optional()
            {
                println!("cargo:warning=Failed to embed Windows resources: {error}");
            }
        } else {
            println!(
                "cargo:warning=No resource script at {}; the editor window will use the default icon.",
                resource_script.display()
            );
        }
    }
}
