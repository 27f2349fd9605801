use quick_xml::escape::escape;

/// Minimal landing page linking every published file.
pub fn index_html(title: &str, files: &[&str]) -> String {
    let title = escape(title);
    let links: String = files
        .iter()
        .map(|file| {
            let file = escape(*file);
            format!("      <li><a href=\"{file}\">{file}</a></li>\n")
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         \x20 <head>\n\
         \x20   <meta charset=\"utf-8\">\n\
         \x20   <title>{title}</title>\n\
         \x20 </head>\n\
         \x20 <body>\n\
         \x20   <h1>{title}</h1>\n\
         \x20   <ul>\n\
         {links}\
         \x20   </ul>\n\
         \x20 </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_links_files() {
        let html = index_html("EnviDat OpenDataSwiss XML", &["dcat-ap-ch.xml"]);

        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>EnviDat OpenDataSwiss XML</title>"));
        assert!(html.contains("<li><a href=\"dcat-ap-ch.xml\">dcat-ap-ch.xml</a></li>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_index_escapes_title() {
        let html = index_html("Data & <More>", &[]);
        assert!(html.contains("<h1>Data &amp; &lt;More&gt;</h1>"));
        assert!(!html.contains("<li>"));
    }
}
