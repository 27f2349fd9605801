use crate::models::{ContactKind, Dataset, Distribution};
use common::{Error, Result};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const XSD_DATETIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
const XSD_ANYURI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

/// Root namespace declarations, in output order.
pub const NAMESPACES: [(&str, &str); 10] = [
    ("xmlns:dct", "http://purl.org/dc/terms/"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:dcat", "http://www.w3.org/ns/dcat#"),
    ("xmlns:foaf", "http://xmlns.com/foaf/0.1/"),
    ("xmlns:xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("xmlns:rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xmlns:rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("xmlns:vcard", "http://www.w3.org/2006/vcard/ns#"),
    ("xmlns:odrs", "http://schema.theodi.org/odrs#"),
    ("xmlns:schema", "http://schema.org/"),
];

/// Serialises the datasets into one `rdf:RDF` document holding a single
/// `dcat:Catalog`. An empty slice gives an empty catalog.
pub fn catalog_xml(datasets: &[Dataset]) -> Result<String> {
    let mut xml = CatalogWriter::new();

    xml.decl()?;

    let mut root = BytesStart::new("rdf:RDF");
    for attr in NAMESPACES {
        root.push_attribute(attr);
    }
    xml.write(Event::Start(root))?;

    if datasets.is_empty() {
        xml.empty("dcat:Catalog", &[])?;
    } else {
        xml.start("dcat:Catalog", &[])?;
        for dataset in datasets {
            xml.start("dcat:dataset", &[])?;
            write_dataset(&mut xml, dataset)?;
            xml.end("dcat:dataset")?;
        }
        xml.end("dcat:Catalog")?;
    }

    xml.end("rdf:RDF")?;
    xml.finish()
}

fn write_dataset(xml: &mut CatalogWriter, dataset: &Dataset) -> Result<()> {
    xml.start("dcat:Dataset", &[("rdf:about", dataset.landing_page.as_str())])?;

    xml.text("dct:identifier", &[], &dataset.identifier)?;
    xml.text("dct:title", &[("xml:lang", dataset.language.as_str())], &dataset.title)?;
    xml.text("dct:description", &[("xml:lang", dataset.language.as_str())], &dataset.description)?;
    if let Some(issued) = &dataset.issued {
        xml.text("dct:issued", &[("rdf:datatype", XSD_DATETIME)], issued)?;
    }
    if let Some(modified) = &dataset.modified {
        xml.text("dct:modified", &[("rdf:datatype", XSD_DATETIME)], modified)?;
    }

    xml.start("dct:publisher", &[])?;
    xml.start("rdf:Description", &[])?;
    xml.text("rdfs:label", &[], &dataset.publisher)?;
    xml.end("rdf:Description")?;
    xml.end("dct:publisher")?;

    for contact in &dataset.contact_points {
        let tag = match contact.kind {
            ContactKind::Individual => "vcard:Individual",
            ContactKind::Organization => "vcard:Organization",
        };
        xml.start("dcat:contactPoint", &[])?;
        xml.start(tag, &[])?;
        xml.text("vcard:fn", &[], &contact.name)?;
        xml.empty("vcard:hasEmail", &[("rdf:resource", contact.email.as_str())])?;
        xml.end(tag)?;
        xml.end("dcat:contactPoint")?;
    }

    xml.empty("dcat:theme", &[("rdf:resource", dataset.theme.as_str())])?;
    xml.text("dct:language", &[], &dataset.language)?;
    for keyword in &dataset.keywords {
        xml.text("dcat:keyword", &[("xml:lang", dataset.language.as_str())], keyword)?;
    }
    xml.text("dcat:landingPage", &[], &dataset.landing_page)?;

    for distribution in &dataset.distributions {
        xml.start("dcat:distribution", &[])?;
        write_distribution(xml, distribution)?;
        xml.end("dcat:distribution")?;
    }

    xml.end("dcat:Dataset")
}

fn write_distribution(xml: &mut CatalogWriter, d: &Distribution) -> Result<()> {
    xml.start("dcat:Distribution", &[("rdf:about", d.page_url.as_str())])?;

    xml.text("dct:identifier", &[], &d.identifier)?;
    xml.text("dct:title", &[("xml:lang", d.language.as_str())], &d.title)?;
    xml.text("dct:description", &[("xml:lang", d.language.as_str())], &d.description)?;
    xml.text("dct:issued", &[("rdf:datatype", XSD_DATETIME)], &d.issued)?;
    xml.text("dct:modified", &[("rdf:datatype", XSD_DATETIME)], &d.modified)?;
    xml.text("dct:language", &[], &d.language)?;
    xml.text("dcat:accessURL", &[("rdf:datatype", XSD_ANYURI)], &d.access_url)?;
    xml.text("dct:rights", &[], d.rights)?;
    xml.text("dcat:byteSize", &[], &d.byte_size.to_string())?;
    if let Some(media_type) = &d.media_type {
        xml.text("dcat:mediaType", &[], media_type)?;
    }
    if let Some(format) = &d.format {
        xml.text("dct:format", &[], format)?;
    }

    xml.end("dcat:Distribution")
}

/// Tab-indented writer; empty text nodes collapse into self-closing tags.
struct CatalogWriter {
    inner: Writer<Vec<u8>>,
}

impl CatalogWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b'\t', 1),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }

    fn decl(&mut self) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        if text.is_empty() {
            return self.empty(name, attrs);
        }
        self.start(name, attrs)?;
        self.write(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.end(name)
    }

    fn finish(self) -> Result<String> {
        let mut bytes = self.inner.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for attr in attrs {
        start.push_attribute(*attr);
    }
    start
}
